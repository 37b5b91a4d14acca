use foundation::ids::ViewId;
use scene::selection::Invalidation;

/// What caused a render pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// First render after the datasets loaded.
    Initial,
    Dispatch,
}

/// One batch of view rebuilds.
///
/// Passes are numbered from 0 in the order they run, so a log of passes can
/// be replayed against the same datasets.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    pub index: u64,
    pub trigger: Trigger,
    /// Views rebuilt in this pass, in `ViewId` order.
    pub views: Vec<ViewId>,
}

impl RenderPass {
    pub fn initial() -> Self {
        Self {
            index: 0,
            trigger: Trigger::Initial,
            views: ViewId::ALL.to_vec(),
        }
    }

    pub fn next(&self, invalidation: &Invalidation) -> Self {
        Self {
            index: self.index + 1,
            trigger: Trigger::Dispatch,
            views: invalidation.iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
