/// Fixed-capacity pre and post culler stacks.
///
/// Pre-cullers run before the camera frustum, newest first. Post-cullers
/// run after it, oldest first. Popping clears the slot so the culler is
/// released immediately.

use crate::cull::SharedCuller;
use crate::error::Result;
use crate::engine_bail;

struct FixedStack {
    slots: Box<[Option<SharedCuller>]>,
    count: usize,
    name: &'static str,
}

impl FixedStack {
    fn new(capacity: usize, name: &'static str) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
            count: 0,
            name,
        }
    }

    fn push(&mut self, culler: SharedCuller) -> Result<()> {
        if self.count == self.slots.len() {
            engine_bail!("xen::CullersStack", StackOverflow,
                "{} stack is full ({} cullers)", self.name, self.slots.len());
        }
        self.slots[self.count] = Some(culler);
        self.count += 1;
        Ok(())
    }

    fn pop(&mut self) -> Result<SharedCuller> {
        if self.count == 0 {
            engine_bail!("xen::CullersStack", StackUnderflow, "pop on an empty {} stack", self.name);
        }
        self.count -= 1;
        match self.slots[self.count].take() {
            Some(culler) => Ok(culler),
            None => engine_bail!("xen::CullersStack", StackUnderflow,
                "{} slot {} was already empty", self.name, self.count),
        }
    }

    fn active(&self) -> impl DoubleEndedIterator<Item = &SharedCuller> + '_ {
        self.slots[..self.count].iter().flatten()
    }
}

pub struct CullersStack {
    pre: FixedStack,
    post: FixedStack,
}

impl CullersStack {
    pub fn new(max_pre_cullers: usize, max_post_cullers: usize) -> Self {
        Self {
            pre: FixedStack::new(max_pre_cullers, "pre-culler"),
            post: FixedStack::new(max_post_cullers, "post-culler"),
        }
    }

    pub fn push_pre_culler(&mut self, culler: SharedCuller) -> Result<()> {
        self.pre.push(culler)
    }

    pub fn pop_pre_culler(&mut self) -> Result<SharedCuller> {
        self.pre.pop()
    }

    pub fn push_post_culler(&mut self, culler: SharedCuller) -> Result<()> {
        self.post.push(culler)
    }

    pub fn pop_post_culler(&mut self) -> Result<SharedCuller> {
        self.post.pop()
    }

    pub fn pre_culler_count(&self) -> usize {
        self.pre.count
    }

    pub fn post_culler_count(&self) -> usize {
        self.post.count
    }

    pub fn pre_culler_capacity(&self) -> usize {
        self.pre.slots.len()
    }

    pub fn post_culler_capacity(&self) -> usize {
        self.post.slots.len()
    }

    /// Pre-cullers in evaluation order (last pushed first)
    pub fn pre_cullers(&self) -> impl Iterator<Item = &SharedCuller> + '_ {
        self.pre.active().rev()
    }

    /// Post-cullers in evaluation order (first pushed first)
    pub fn post_cullers(&self) -> impl Iterator<Item = &SharedCuller> + '_ {
        self.post.active()
    }
}

#[cfg(test)]
#[path = "cullers_stack_tests.rs"]
mod tests;
