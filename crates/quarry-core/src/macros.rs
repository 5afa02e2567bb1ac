/// Builds a [`Criteria`](crate::stmt::Criteria) map from `column => value`
/// pairs, preserving their order.
///
/// ```
/// let criteria = quarry_core::criteria! {
///     "status" => "open",
///     "deleted_at" => None::<i64>,
/// };
/// assert_eq!(criteria.len(), 2);
/// ```
#[macro_export]
macro_rules! criteria {
    () => {
        $crate::stmt::Criteria::new()
    };
    ( $( $column:expr => $value:expr ),+ $(,)? ) => {
        $crate::stmt::Criteria::new()
            $( .with($column, $value) )+
    };
}
