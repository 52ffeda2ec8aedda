use crate::space::State;

/// A search problem over an implicit graph of States.
///
/// The goal condition is either the State's own [`State::is_goal`] or, when a
/// target is given, reaching a State equal to it.
pub trait Problem<St>: std::fmt::Debug
where
    St: State,
{
    fn start(&self) -> &St;
    fn target(&self) -> Option<&St>;

    fn is_goal(&self, s: &St) -> bool {
        s.is_goal() || self.target().is_some_and(|t| t == s)
    }
}

/// A Problem built from plain States.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance<St>
where
    St: State,
{
    start: St,
    target: Option<St>,
}

impl<St> Instance<St>
where
    St: State,
{
    pub fn new(start: St) -> Self {
        Self {
            start,
            target: None,
        }
    }

    pub fn with_target(start: St, target: St) -> Self {
        Self {
            start,
            target: Some(target),
        }
    }
}

impl<St> Problem<St> for Instance<St>
where
    St: State,
{
    fn start(&self) -> &St {
        &self.start
    }
    fn target(&self) -> Option<&St> {
        self.target.as_ref()
    }
}

impl<St> std::fmt::Display for Instance<St>
where
    St: State,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.target {
            Some(t) => write!(f, "Start: {}, End: {}", self.start, t),
            None => write!(f, "Start: {}", self.start),
        }
    }
}
