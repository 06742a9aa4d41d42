use joinorm_core::stmt::CompositeKey;

/// Parse state of one node, carried across the rows of a pass.
pub(crate) struct State<M> {
    /// Key of the unit in progress
    pub(crate) key: Option<CompositeKey>,

    /// Object of the unit in progress. `Some` once its primitives are decoded.
    pub(crate) current: Option<M>,

    /// Closed units not yet handed out. For a nested node these belong to the
    /// parent's unit in progress.
    pub(crate) results: Vec<M>,

    /// Row the node was first reached on within the parent's unit
    pub(crate) first_row: Option<usize>,

    /// The node's values for the parent's unit are complete
    pub(crate) frozen: bool,

    /// Rows the node took to resolve, recorded when frozen
    pub(crate) frozen_rows: usize,
}

impl<M> State<M> {
    /// Forgets the unit in progress, keeping closed units.
    pub(crate) fn restart(&mut self) {
        self.key = None;
        self.current = None;
    }
}

impl<M> Default for State<M> {
    fn default() -> Self {
        Self {
            key: None,
            current: None,
            results: Vec::new(),
            first_row: None,
            frozen: false,
            frozen_rows: 0,
        }
    }
}
