pub mod organization;
pub mod tracking;

/// Store generated identifier shared by every entity.
pub type Ident = i64;

pub trait Entity {
    fn ident(&self) -> Ident;
}

/// A persisted entity: the store assigned identity plus its state.
///
/// New entities only exist as `State` until the store restores them with an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCtl<State> {
    id: Ident,
    state: State,
}

impl<State> Entity for EntityCtl<State> {
    fn ident(&self) -> Ident {
        self.id
    }
}

impl<State> EntityCtl<State> {
    pub fn restore(id: Ident, state: State) -> Self {
        Self { id, state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn into_state(self) -> State {
        self.state
    }
}

macro_rules! state_ref {
    ($prop:ident, $rtrn:ty) => {
        pub fn $prop(&self) -> &$rtrn {
            &self.state.$prop
        }
    };
}

macro_rules! state_copy {
    ($prop:ident, $rtrn:ty) => {
        pub fn $prop(&self) -> $rtrn {
            self.state.$prop
        }
    };
}

pub(self) use state_copy;
pub(self) use state_ref;
