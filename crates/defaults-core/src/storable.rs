use bytes::Bytes;
use defaults_store::Encoded;
use tracing::debug;

/// A type that can turn itself into the store's vocabulary.
pub trait Persistable {
    /// Encode `self`, or return `None` if it has no representation.
    fn encode(&self) -> Option<Encoded>;
}

/// A type that can be rebuilt from the store's vocabulary.
pub trait Retrievable: Sized {
    /// Decode a value, returning `None` if `encoded` has the wrong shape.
    ///
    /// Must never panic on unexpected input.
    fn decode(encoded: Encoded) -> Option<Self>;
}

/// A type usable with [`UserDefault`](crate::UserDefault).
pub trait Storable: Persistable + Retrievable {}

impl<T: Persistable + Retrievable> Storable for T {}

/// Primitives are their own encoding. Decoding checks the variant only;
/// there is no numeric coercion between variants.
macro_rules! primitive_storable {
    ($($ty:ty => $variant:ident),+ $(,)?) => {$(
        impl Persistable for $ty {
            fn encode(&self) -> Option<Encoded> {
                Some(Encoded::$variant(Clone::clone(self)))
            }
        }

        impl Retrievable for $ty {
            fn decode(encoded: Encoded) -> Option<Self> {
                match encoded {
                    Encoded::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    )+};
}

primitive_storable! {
    String => String,
    i64 => Integer,
    f64 => Double,
    f32 => Float,
    bool => Bool,
}

impl Persistable for Bytes {
    fn encode(&self) -> Option<Encoded> {
        Some(Encoded::Data(self.to_vec()))
    }
}

impl Retrievable for Bytes {
    fn decode(encoded: Encoded) -> Option<Self> {
        match encoded {
            Encoded::Data(data) => Some(Bytes::from(data)),
            _ => None,
        }
    }
}

/// Every element is encoded. If any element has no encoding the sequence
/// has none either, since an array slot cannot hold absence.
impl<T: Persistable> Persistable for Vec<T> {
    fn encode(&self) -> Option<Encoded> {
        self.iter()
            .map(Persistable::encode)
            .collect::<Option<Vec<_>>>()
            .map(Encoded::Array)
    }
}

/// Elements that fail to decode are dropped; the rest keep their order.
impl<T: Retrievable> Retrievable for Vec<T> {
    fn decode(encoded: Encoded) -> Option<Self> {
        let Encoded::Array(items) = encoded else {
            return None;
        };
        let total = items.len();
        let decoded: Vec<T> = items.into_iter().filter_map(T::decode).collect();
        if decoded.len() < total {
            debug!(
                total,
                dropped = total - decoded.len(),
                "dropped undecodable array elements"
            );
        }
        Some(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roundtrip<T: Storable>(value: &T) -> Option<T> {
        T::decode(value.encode()?)
    }

    // -----------------------------------------------------------------------
    // Primitives
    // -----------------------------------------------------------------------

    #[test]
    fn primitives_encode_as_themselves() {
        assert_eq!("hi".to_string().encode(), Some(Encoded::String("hi".into())));
        assert_eq!(42i64.encode(), Some(Encoded::Integer(42)));
        assert_eq!(1.5f64.encode(), Some(Encoded::Double(1.5)));
        assert_eq!(0.25f32.encode(), Some(Encoded::Float(0.25)));
        assert_eq!(true.encode(), Some(Encoded::Bool(true)));
        assert_eq!(
            Bytes::from_static(b"\x00\x01").encode(),
            Some(Encoded::Data(vec![0, 1]))
        );
    }

    #[test]
    fn no_numeric_coercion() {
        assert_eq!(f64::decode(Encoded::Integer(1)), None);
        assert_eq!(i64::decode(Encoded::Double(1.0)), None);
        assert_eq!(f32::decode(Encoded::Double(1.0)), None);
        assert_eq!(i64::decode(Encoded::Bool(true)), None);
        assert_eq!(bool::decode(Encoded::Integer(1)), None);
    }

    #[test]
    fn string_does_not_decode_from_data() {
        assert_eq!(String::decode(Encoded::Data(b"text".to_vec())), None);
        assert_eq!(Bytes::decode(Encoded::String("text".into())), None);
    }

    // -----------------------------------------------------------------------
    // Arrays
    // -----------------------------------------------------------------------

    #[test]
    fn array_encodes_every_element() {
        let encoded = vec![1i64, 2, 3].encode().unwrap();
        assert_eq!(
            encoded,
            Encoded::Array(vec![
                Encoded::Integer(1),
                Encoded::Integer(2),
                Encoded::Integer(3)
            ])
        );
    }

    #[test]
    fn array_drops_bad_elements_in_order() {
        let encoded = Encoded::Array(vec![
            Encoded::Integer(1),
            Encoded::String("not a number".into()),
            Encoded::Integer(3),
            Encoded::Bool(false),
            Encoded::Integer(5),
        ]);
        assert_eq!(Vec::<i64>::decode(encoded), Some(vec![1, 3, 5]));
    }

    #[test]
    fn array_of_all_bad_elements_is_empty_not_none() {
        let encoded = Encoded::Array(vec![Encoded::Bool(true), Encoded::Float(1.0)]);
        assert_eq!(Vec::<String>::decode(encoded), Some(vec![]));
    }

    #[test]
    fn array_requires_array_variant() {
        assert_eq!(Vec::<i64>::decode(Encoded::Integer(1)), None);
        assert_eq!(Vec::<String>::decode(Encoded::Data(vec![1, 2])), None);
    }

    #[test]
    fn nested_arrays() {
        let value = vec![vec![1i64, 2], vec![], vec![3]];
        assert_eq!(roundtrip(&value), Some(value));
    }

    #[test]
    fn nested_array_drops_only_inner_failures() {
        let encoded = Encoded::Array(vec![
            Encoded::Array(vec![Encoded::Integer(1), Encoded::Double(2.0)]),
            Encoded::Integer(9),
            Encoded::Array(vec![Encoded::Integer(3)]),
        ]);
        assert_eq!(Vec::<Vec<i64>>::decode(encoded), Some(vec![vec![1], vec![3]]));
    }

    #[test]
    fn empty_array_roundtrip() {
        let value: Vec<String> = vec![];
        assert_eq!(roundtrip(&value), Some(value));
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn string_roundtrip(s in ".*") {
            prop_assert_eq!(roundtrip(&s), Some(s.clone()));
        }

        #[test]
        fn integer_roundtrip(n in any::<i64>()) {
            prop_assert_eq!(roundtrip(&n), Some(n));
        }

        #[test]
        fn double_roundtrip(x in any::<f64>().prop_filter("not NaN", |x| !x.is_nan())) {
            prop_assert_eq!(roundtrip(&x), Some(x));
        }

        #[test]
        fn float_roundtrip(x in any::<f32>().prop_filter("not NaN", |x| !x.is_nan())) {
            prop_assert_eq!(roundtrip(&x), Some(x));
        }

        #[test]
        fn bytes_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            let b = Bytes::from(data);
            prop_assert_eq!(roundtrip(&b), Some(b.clone()));
        }

        #[test]
        fn array_roundtrip_keeps_length(items in proptest::collection::vec(any::<i64>(), 0..32)) {
            let back = roundtrip(&items).unwrap();
            prop_assert_eq!(back.len(), items.len());
            prop_assert_eq!(back, items);
        }

        #[test]
        fn one_corrupt_element_drops_exactly_one(
            items in proptest::collection::vec(any::<bool>(), 1..32),
            idx in any::<prop::sample::Index>(),
        ) {
            let corrupt_at = idx.index(items.len());
            let Some(Encoded::Array(mut encoded)) = items.encode() else {
                panic!("bool array must encode");
            };
            encoded[corrupt_at] = Encoded::String("corrupt".into());

            let mut expected = items.clone();
            expected.remove(corrupt_at);
            prop_assert_eq!(Vec::<bool>::decode(Encoded::Array(encoded)), Some(expected));
        }
    }
}
