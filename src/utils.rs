/// Removes the value at `source_idx` and reinserts it so that it ends up at `target_idx`.
/// Does nothing if `source_idx` is equal to `target_idx`.
///
/// # Panics
/// Panics if either index is outside the vec bounds.
pub fn move_item<T>(source_idx: usize, target_idx: usize, vec: &mut Vec<T>) {
    let len = vec.len();
    assert!(
        source_idx < len && target_idx < len,
        "cannot move item {source_idx} to {target_idx} in a list of {len} items"
    );

    if source_idx == target_idx {
        return;
    }

    let item = vec.remove(source_idx);
    vec.insert(target_idx, item);
}
