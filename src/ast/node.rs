use super::position::Position;

pub trait HasPos {
    fn pos(&self) -> Position;
}
