/// Draw layer. Layers are drawn back-to-front in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DrawLayer {
    /// Map tiles and collectibles.
    Map = 0,
    Wild = 1,
    Player = 2,
    /// Captured species along the right edge.
    Sidebar = 3,
    Encounter = 4,
    Hud = 5,
}

impl DrawLayer {
    pub const COUNT: usize = 6;

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Map),
            1 => Some(Self::Wild),
            2 => Some(Self::Player),
            3 => Some(Self::Sidebar),
            4 => Some(Self::Encounter),
            5 => Some(Self::Hud),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_back_to_front() {
        assert!(DrawLayer::Map < DrawLayer::Wild);
        assert!(DrawLayer::Wild < DrawLayer::Player);
        assert!(DrawLayer::Player < DrawLayer::Sidebar);
        assert!(DrawLayer::Sidebar < DrawLayer::Encounter);
        assert!(DrawLayer::Encounter < DrawLayer::Hud);
    }

    #[test]
    fn u8_codes() {
        for val in 0..DrawLayer::COUNT as u8 {
            assert_eq!(DrawLayer::from_u8(val).map(DrawLayer::as_u8), Some(val));
        }
        assert!(DrawLayer::from_u8(6).is_none());
    }
}
