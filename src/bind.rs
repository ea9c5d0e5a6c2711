use smol_str::SmolStr;

/// An opaque value bound to one `?` placeholder. The builder never inspects
/// or coerces it.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Null,
    String(String),
    StaticString(&'static str),
    Bool(bool),
    F32(f32),
    F64(f64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),

    // unsigned not so sure about it ?
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),

    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),
    #[cfg(feature = "chrono")]
    ChronoDateTime(chrono::DateTime<chrono::Utc>),
    #[cfg(feature = "chrono")]
    ChronoNaiveDateTime(chrono::NaiveDateTime),
    #[cfg(feature = "chrono")]
    ChronoDate(chrono::NaiveDate),
    #[cfg(feature = "time")]
    TimeOffsetDateTime(time::OffsetDateTime),
    #[cfg(feature = "time")]
    TimePrimitiveDateTime(time::PrimitiveDateTime),
    #[cfg(feature = "time")]
    TimeDate(time::Date),
    #[cfg(feature = "json")]
    Json(serde_json::Value),
}

impl Bind {
    pub fn is_null(&self) -> bool {
        matches!(self, Bind::Null)
    }

    /// Integer view of the value, used when reading aggregates back.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Bind::I8(v) => Some(i64::from(*v)),
            Bind::I16(v) => Some(i64::from(*v)),
            Bind::I32(v) => Some(i64::from(*v)),
            Bind::I64(v) => Some(*v),
            Bind::U8(v) => Some(i64::from(*v)),
            Bind::U16(v) => Some(i64::from(*v)),
            Bind::U32(v) => Some(i64::from(*v)),
            Bind::U64(v) => i64::try_from(*v).ok(),
            Bind::String(v) => v.parse().ok(),
            Bind::StaticString(v) => v.parse().ok(),
            _ => None,
        }
    }
}

pub type Binds = Array<Bind>;

// if T <= 32 bytes we are good and it's a free data structure.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Array<T> {
    #[default]
    None,
    One(T),
    Many(Vec<T>),
}

impl<T> Array<T> {
    pub fn append(&mut self, other: Self) {
        let combined = match (std::mem::replace(self, Self::None), other) {
            (Self::None, cols) | (cols, Self::None) => cols,
            (Self::One(a), Self::One(b)) => Self::Many(vec![a, b]),
            (Self::One(a), Self::Many(mut b)) => {
                b.insert(0, a);
                Self::Many(b)
            }
            (Self::Many(mut a), Self::One(b)) => {
                a.push(b);
                Self::Many(a)
            }
            (Self::Many(mut a), Self::Many(mut b)) => {
                a.append(&mut b);
                Self::Many(a)
            }
        };
        *self = combined;
    }

    pub fn push(&mut self, value: T) {
        self.append(Self::One(value));
    }

    pub fn len(&self) -> usize {
        match self {
            Array::None => 0,
            Array::One(_) => 1,
            Array::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Array::None => (&[] as &[T]).iter(),
            Array::One(one) => std::slice::from_ref(one).iter(),
            Array::Many(many) => many.iter(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::None;
    }

    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::None => Vec::new(),
            Self::One(one) => Vec::from([one]),
            Self::Many(many) => many,
        }
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(mut value: Vec<T>) -> Self {
        match value.len() {
            0 => Array::None,
            1 => value.pop().map_or(Array::None, Array::One),
            _ => Array::Many(value),
        }
    }
}

pub trait IntoBind {
    fn into_bind(self) -> Bind;
}

/// Resolves "one value, many values or none" once, at the API boundary.
pub trait IntoBinds {
    fn into_binds(self) -> Binds;
}

impl IntoBinds for Binds {
    fn into_binds(self) -> Binds {
        self
    }
}

impl IntoBinds for () {
    fn into_binds(self) -> Binds {
        Binds::None
    }
}

impl<T> IntoBinds for T
where
    T: IntoBind,
{
    fn into_binds(self) -> Binds {
        Binds::One(self.into_bind())
    }
}

impl<T> IntoBinds for Vec<T>
where
    T: IntoBind,
{
    fn into_binds(self) -> Binds {
        Binds::from(self.into_iter().map(IntoBind::into_bind).collect::<Vec<_>>())
    }
}

impl<T> IntoBinds for &[T]
where
    T: IntoBind + Clone,
{
    fn into_binds(self) -> Binds {
        Binds::from(self.iter().cloned().map(IntoBind::into_bind).collect::<Vec<_>>())
    }
}

impl<T, const N: usize> IntoBinds for [T; N]
where
    T: IntoBind,
{
    fn into_binds(self) -> Binds {
        Binds::from(self.into_iter().map(IntoBind::into_bind).collect::<Vec<_>>())
    }
}

impl IntoBind for Bind {
    fn into_bind(self) -> Bind {
        self
    }
}

impl<T> IntoBind for Option<T>
where
    T: IntoBind,
{
    fn into_bind(self) -> Bind {
        if let Some(value) = self {
            value.into_bind()
        } else {
            Bind::Null
        }
    }
}

macro_rules! into_bind {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl IntoBind for $ty {
                #[inline]
                fn into_bind(self) -> Bind {
                    Bind::$variant(self)
                }
            }
        )+
    };
}

into_bind! {
    bool => Bool,
    f32 => F32,
    f64 => F64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    String => String,
}

impl IntoBind for &'static str {
    #[inline]
    fn into_bind(self) -> Bind {
        Bind::StaticString(self)
    }
}

impl IntoBind for &String {
    fn into_bind(self) -> Bind {
        Bind::String(self.clone())
    }
}

impl IntoBind for SmolStr {
    fn into_bind(self) -> Bind {
        Bind::String(self.to_string())
    }
}

#[cfg(feature = "uuid")]
into_bind! { uuid::Uuid => Uuid }

#[cfg(feature = "chrono")]
into_bind! {
    chrono::DateTime<chrono::Utc> => ChronoDateTime,
    chrono::NaiveDateTime => ChronoNaiveDateTime,
    chrono::NaiveDate => ChronoDate,
}

#[cfg(feature = "time")]
into_bind! {
    time::OffsetDateTime => TimeOffsetDateTime,
    time::PrimitiveDateTime => TimePrimitiveDateTime,
    time::Date => TimeDate,
}

#[cfg(feature = "json")]
into_bind! { serde_json::Value => Json }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        assert_eq!(Binds::One(Bind::I32(5)), 5.into_binds());
        assert_eq!(Binds::One(Bind::StaticString("a")), "a".into_binds());
    }

    #[test]
    fn test_sequence_keeps_order() {
        let binds = vec![3i64, 1, 2].into_binds();
        assert_eq!(vec![Bind::I64(3), Bind::I64(1), Bind::I64(2)], binds.into_vec());
        let binds = [true, false].into_binds();
        assert_eq!(2, binds.len());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(().into_binds().is_empty());
        assert!(Vec::<i32>::new().into_binds().is_empty());
        assert!([0u8; 0].into_binds().is_empty());
    }

    #[test]
    fn test_option_null() {
        assert_eq!(Binds::One(Bind::Null), None::<i32>.into_binds());
        assert_eq!(Binds::One(Bind::U8(1)), Some(1u8).into_binds());
    }

    #[test]
    fn test_append_order() {
        let mut binds = Binds::None;
        binds.append(1.into_binds());
        binds.append([2, 3].into_binds());
        binds.push(Bind::I32(4));
        let values: Vec<_> = binds.iter().filter_map(Bind::as_i64).collect();
        assert_eq!(vec![1, 2, 3, 4], values);
    }
}
