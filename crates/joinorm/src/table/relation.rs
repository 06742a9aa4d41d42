/// How a nested child's values are stored on the parent model.
pub struct Relation<P, C> {
    pub(crate) assign: Assign<P, C>,
}

pub(crate) enum Assign<P, C> {
    One(Box<dyn Fn(&mut P, Option<C>)>),
    Many(Box<dyn Fn(&mut P, Vec<C>)>),
}

impl<P, C> Relation<P, C> {
    /// A single-valued relation. The setter receives `None` when the joined
    /// row is absent.
    pub fn one(setter: impl Fn(&mut P, Option<C>) + 'static) -> Self {
        Self {
            assign: Assign::One(Box::new(setter)),
        }
    }

    /// A list-valued relation. The setter receives every child of the unit in
    /// row order, possibly none.
    pub fn many(setter: impl Fn(&mut P, Vec<C>) + 'static) -> Self {
        Self {
            assign: Assign::Many(Box::new(setter)),
        }
    }

    pub fn is_many(&self) -> bool {
        matches!(self.assign, Assign::Many(_))
    }

    /// Stores the values collected for one parent unit.
    ///
    /// A single-valued relation keeps the last value when the rows carried
    /// more than one.
    pub(crate) fn store(&self, parent: &mut P, mut values: Vec<C>) {
        match &self.assign {
            Assign::One(setter) => setter(parent, values.pop()),
            Assign::Many(setter) => setter(parent, values),
        }
    }
}

impl<P, C> core::fmt::Debug for Relation<P, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.assign {
            Assign::One(_) => f.write_str("Relation::One"),
            Assign::Many(_) => f.write_str("Relation::Many"),
        }
    }
}
