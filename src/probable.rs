/// Frequency statistics over a collection of elements.
///
/// Implementors supply the occurrence count; probability and expected value
/// follow from it.
///
/// # Examples
///
/// ```
/// use osrb_tree::{Probable, RedBlackTree};
///
/// let tree = RedBlackTree::from([(1, ()), (2, ()), (3, ()), (3, ())]);
///
/// assert_eq!(tree.count_of(&[3]), 2);
/// assert_eq!(tree.probability_of(&[2, 3]), 0.75);
/// assert_eq!(tree.expected_value(16, &[2, 3]), 12.0);
/// ```
pub trait Probable {
    /// The type whose occurrences are counted.
    type Element;

    /// Total number of elements in the collection.
    fn sample_size(&self) -> usize;

    /// Number of occurrences of any of `elements`. An element listed twice is counted twice.
    fn count_of(&self, elements: &[Self::Element]) -> usize;

    /// `count_of(elements) / sample_size()`, or `0.0` for an empty collection.
    #[allow(clippy::cast_precision_loss)]
    fn probability_of(&self, elements: &[Self::Element]) -> f64 {
        match self.sample_size() {
            0 => 0.0,
            total => self.count_of(elements) as f64 / total as f64,
        }
    }

    /// Expected number of hits on `elements` over `trials` independent draws.
    #[allow(clippy::cast_precision_loss)]
    fn expected_value(&self, trials: usize, elements: &[Self::Element]) -> f64 {
        trials as f64 * self.probability_of(elements)
    }
}
