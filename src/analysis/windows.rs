/// All contiguous windows of `size` elements, as borrowed views into the
/// parent series, at offsets 0..n-size. The enumeration stops one offset
/// short of the last full window: that final slice is exactly the tail the
/// scan compares against, so it never appears among the candidates.
pub fn sliding_windows<T>(series: &[T], size: usize) -> Vec<&[T]> {
    if size == 0 || series.len() < size {
        return Vec::new();
    }
    (0..series.len() - size)
        .map(|offset| &series[offset..offset + size])
        .collect()
}

/// The most recent window: the last `size` elements, or the whole series if
/// it is shorter. A plain tail slice, deliberately not one of the enumerated
/// windows above.
pub fn tail_window<T>(series: &[T], size: usize) -> &[T] {
    &series[series.len().saturating_sub(size)..]
}
