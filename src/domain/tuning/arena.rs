/// Playfield dimensions and the collision slack shared by every overlap test.

#[derive(Debug, Clone, Copy)]
pub struct ArenaTuning {
    /// Playfield width in units.
    pub width: f32,

    /// Playfield height in units.
    pub height: f32,

    /// Extra reach added to every box in overlap tests.
    pub collision_margin: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            collision_margin: 5.0,
        }
    }
}
