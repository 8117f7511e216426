/// Inline list of actions. Most positions in the supported games have fewer
/// than 16 legal actions, so action lists rarely spill onto the heap.
pub type ActionList<T> = smallvec::SmallVec<[T; 16]>;
