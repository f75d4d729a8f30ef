/// Splits `users` virtual users across `threads` workers as evenly as
/// possible: the remainder goes to the first workers, one extra each, so
/// the shares always sum to `users` exactly.
#[must_use]
pub fn partition_users(users: u64, threads: usize) -> Vec<u64> {
    if threads == 0 {
        return Vec::new();
    }
    let threads_u64 = threads as u64;
    let base = users.checked_div(threads_u64).unwrap_or(0);
    let remainder = users.checked_rem(threads_u64).unwrap_or(0);

    (0..threads_u64)
        .map(|index| {
            if index < remainder {
                base.saturating_add(1)
            } else {
                base
            }
        })
        .collect()
}
