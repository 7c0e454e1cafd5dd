//! Sequential fan-out over a list whose steps may suspend.
//!
//! Applying an effect to each of N ships, where each application may wait
//! for input, cannot be a plain loop. Instead the step for the head of the
//! list receives "continue with the rest" as its continuation; the final
//! continuation runs once the list is empty.

use std::collections::VecDeque;
use std::rc::Rc;

use super::Continuation;

/// The per-item step: do the work for `item`, then call the continuation.
pub type Step<C, T> = Rc<dyn Fn(&mut C, T, Continuation<C>)>;

/// Run `step` for every item in order, then `on_done`.
///
/// Each step must call its continuation exactly once; the next item does
/// not start until it does. With no items `on_done` runs immediately.
///
/// ```
/// use rust_skirmish::triggers::in_sequence;
///
/// let mut seen = Vec::new();
/// in_sequence(
///     &mut seen,
///     vec![1, 2, 3],
///     |seen: &mut Vec<i32>, n, next| {
///         seen.push(n);
///         next(seen);
///     },
///     |seen: &mut Vec<i32>| seen.push(0),
/// );
/// assert_eq!(seen, vec![1, 2, 3, 0]);
/// ```
pub fn in_sequence<C, T, I>(
    ctx: &mut C,
    items: I,
    step: impl Fn(&mut C, T, Continuation<C>) + 'static,
    on_done: impl FnOnce(&mut C) + 'static,
) where
    C: 'static,
    T: 'static,
    I: IntoIterator<Item = T>,
{
    let remaining: VecDeque<T> = items.into_iter().collect();
    advance(ctx, remaining, Rc::new(step), Box::new(on_done));
}

fn advance<C: 'static, T: 'static>(
    ctx: &mut C,
    mut remaining: VecDeque<T>,
    step: Step<C, T>,
    on_done: Continuation<C>,
) {
    match remaining.pop_front() {
        Some(item) => {
            let rest = Rc::clone(&step);
            step(ctx, item, Box::new(move |ctx: &mut C| advance(ctx, remaining, rest, on_done)));
        }
        None => on_done(ctx),
    }
}
