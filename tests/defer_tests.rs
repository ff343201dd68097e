// Host-side tests for deferred work on a busy cell.

#[path = "../src/defer.rs"]
mod defer;

use defer::with_mut_or_defer;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Lifecycle {
    teardowns: u32,
}

fn teardown(l: &mut Lifecycle) {
    l.teardowns += 1;
}

#[test]
fn free_cell_runs_immediately() {
    let cell = Rc::new(RefCell::new(Lifecycle::default()));
    let ran = with_mut_or_defer(&cell, teardown, |_| panic!("should not defer"));
    assert!(ran);
    assert_eq!(cell.borrow().teardowns, 1);
}

#[test]
fn busy_cell_defers_until_borrow_ends() {
    let cell = Rc::new(RefCell::new(Lifecycle::default()));
    let mut queue: Vec<Box<dyn FnOnce()>> = Vec::new();
    {
        let _busy = cell.borrow();
        let ran = with_mut_or_defer(&cell, teardown, |retry| queue.push(retry));
        assert!(!ran);
    }
    assert_eq!(cell.borrow().teardowns, 0);
    assert_eq!(queue.len(), 1);
    for retry in queue {
        retry();
    }
    assert_eq!(cell.borrow().teardowns, 1);
}
