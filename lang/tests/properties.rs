use inline_collection::prelude::*;
use proptest::prelude::*;

#[inline_collection(4)]
#[derive(Clone, Debug, PartialEq)]
struct Quad<T>;

proptest! {
    #[test]
    fn slots_return_constructor_arguments(
        (a, b, c, d) in any::<(u64, u64, u64, u64)>()
    ) {
        let q = Quad::new(a, b, c, d);
        prop_assert_eq!(q[0], a);
        prop_assert_eq!(q[1], b);
        prop_assert_eq!(q[2], c);
        prop_assert_eq!(q[3], d);
    }

    #[test]
    fn views_agree_with_storage(
        (a, b, c, d) in any::<(i32, i32, i32, i32)>()
    ) {
        let mut q = Quad::new(a, b, c, d);
        prop_assert_eq!(q.as_slice(), &[a, b, c, d]);
        prop_assert_eq!(q.as_mut_slice().len(), 4);
    }

    #[test]
    fn to_array_detaches_from_storage(
        (a, b, c, d) in any::<(u8, u8, u8, u8)>()
    ) {
        let q = Quad::new(a, b, c, d);
        let mut arr = q.to_array();
        prop_assert_eq!(arr, [a, b, c, d]);

        arr[0] = arr[0].wrapping_add(1);
        prop_assert_eq!(q[0], a);
    }

    #[test]
    fn tuple_conversion_matches_constructor(
        tuple in any::<(u16, u16, u16, u16)>()
    ) {
        prop_assert_eq!(
            Quad::from(tuple),
            Quad::new(tuple.0, tuple.1, tuple.2, tuple.3)
        );
    }

    #[test]
    fn iteration_is_ordered_and_restartable(
        (a, b, c, d) in any::<(i64, i64, i64, i64)>()
    ) {
        let q = Quad::new(a, b, c, d);
        let first: Vec<i64> = q.iter().copied().collect();
        let second: Vec<i64> = q.iter().copied().collect();
        prop_assert_eq!(&first, &vec![a, b, c, d]);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn writes_through_any_surface_agree(
        (a, b, c, d) in any::<(u32, u32, u32, u32)>(),
        replacement in any::<u32>()
    ) {
        let mut q = Quad::new(a, b, c, d);

        q[3] = replacement;
        prop_assert_eq!(q.item3, replacement);

        q.as_mut_slice()[0] = replacement;
        prop_assert_eq!(q.item0, replacement);
    }
}
