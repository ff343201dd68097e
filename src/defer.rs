//! Run work against a shared cell now, or once its current borrow ends.

use std::cell::RefCell;
use std::rc::Rc;

/// Apply `f` to `cell` immediately when it can be borrowed mutably.
/// Otherwise hand a retry to `defer`, which must run it after the current
/// borrow is released. Returns true when `f` ran immediately.
pub fn with_mut_or_defer<T: 'static>(
    cell: &Rc<RefCell<T>>,
    f: impl FnOnce(&mut T) + 'static,
    defer: impl FnOnce(Box<dyn FnOnce()>),
) -> bool {
    if let Ok(mut value) = cell.try_borrow_mut() {
        f(&mut value);
        return true;
    }
    let cell = cell.clone();
    defer(Box::new(move || f(&mut cell.borrow_mut())));
    false
}
