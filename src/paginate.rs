use crate::Builder;

/// Zero-based page window mapped onto `LIMIT` / `OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: u32,
    per_page: u32,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            per_page: 15,
            current_page: 0,
        }
    }
}

impl Paginator {
    pub fn new(current_page: u32, per_page: u32) -> Self {
        Self {
            current_page,
            per_page,
        }
    }

    pub fn limit(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> u32 {
        self.current_page.saturating_mul(self.per_page)
    }
}

impl Builder {
    pub fn paginate(&mut self, page: u32, per_page: u32) -> &mut Self {
        let paginator = Paginator::new(page, per_page);
        self.limit = paginator.limit();
        self.offset = paginator.offset();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let paginator = Paginator::default();
        assert_eq!(15, paginator.limit());
        assert_eq!(0, paginator.offset());
    }

    #[test]
    fn test_paginate_builder() {
        let mut builder = Builder::table("posts");
        builder.paginate(2, 20);
        assert_eq!(
            "SELECT * FROM posts LIMIT 20 OFFSET 40",
            builder.to_sql().unwrap()
        );
        builder.paginate(0, 20);
        assert_eq!("SELECT * FROM posts LIMIT 20", builder.to_sql().unwrap());
    }

    #[test]
    fn test_offset_saturates() {
        assert_eq!(u32::MAX, Paginator::new(u32::MAX, 2).offset());
    }
}
