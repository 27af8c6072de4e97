/// Implements `From<Vec<T>>` for a newtype over `Vec<$item>`, converting each element.
macro_rules! impl_from_vec {
    ($($t:ty, $item:ty),*) => {$(
        impl<T> From<Vec<T>> for $t
        where
            $item: From<T>,
        {
            fn from(value: Vec<T>) -> Self {
                Self(value.into_iter().map(<$item>::from).collect())
            }
        }
    )*};
}

/// Implements `From<$variant>` for an enum whose variants are named after the wrapped type.
macro_rules! impl_from_variants {
    ($target:ident: $($variant:ident),*) => {$(
        impl From<$variant> for $target {
            fn from(value: $variant) -> Self {
                $target::$variant(value)
            }
        }
    )*};
}

/// Generates the `From` conversions and the `as_point` .. `as_multi_polygon`
/// views shared by `Geometry` and `GeometryCollectionMember`.
macro_rules! impl_accessors {
    ($target:ident) => {
        impl_from_variants!($target: Point, MultiPoint, LineString, MultiLineString, Polygon, MultiPolygon);
        impl_accessors!($target:
            Point => as_point,
            MultiPoint => as_multi_point,
            LineString => as_line_string,
            MultiLineString => as_multi_line_string,
            Polygon => as_polygon,
            MultiPolygon => as_multi_polygon
        );
    };
    ($target:ident: $($variant:ident => $as_fn:ident),*) => {
        impl $target {
            $(
                #[must_use]
                pub fn $as_fn(&self) -> Option<&$variant> {
                    match self {
                        $target::$variant(g) => Some(g),
                        _ => None,
                    }
                }
            )*
        }
    };
}

/// Implements `Deserialize` by reading a generic JSON tree and handing it to `TryFrom<Value>`.
macro_rules! impl_deserialize_from_value {
    ($($t:ty),*) => {$(
        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                Self::try_from(value).map_err(serde::de::Error::custom)
            }
        }
    )*};
}
