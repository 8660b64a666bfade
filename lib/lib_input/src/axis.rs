use crate::{Button, DeviceEvent, InputMapped, MapperContext};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Axis<T> {
    pub positive: T,
    pub negative: T,
}

impl<T: InputMapped> InputMapped for Axis<T> {
    type Bindings = (T::Bindings, T::Bindings);
    type MapperState = (T::MapperState, T::MapperState);

    fn new_mapper(bindings: &Self::Bindings) -> Self::MapperState {
        (T::new_mapper(&bindings.0), T::new_mapper(&bindings.1))
    }

    fn mapper_event(state: &mut Self::MapperState, event: DeviceEvent, ctx: &MapperContext) {
        T::mapper_event(&mut state.0, event, ctx);
        T::mapper_event(&mut state.1, event, ctx);
    }

    fn map(state: &mut Self::MapperState) -> Self {
        Self {
            positive: T::map(&mut state.0),
            negative: T::map(&mut state.1),
        }
    }
}

impl Axis<Button> {
    /// `1` while only the positive side is held, `-1` for only the negative
    /// side, `0` for neither or both.
    pub fn value(&self) -> i8 {
        self.positive.is_held as i8 - self.negative.is_held as i8
    }
}
