/* What a given dot of a scanline does. Ranges are checked in order, so the
 * individual dots past 256 win over the broader ranges.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleType {
    Zero,
    One,
    Visible,
    FlushTileData,
    Prefetch,
    Sprites,
    IncrementY,
    CopyX,
    CopyY,
    MapperTick,
    Idle,
}

impl CycleType {
    pub fn from_cycle(cycle: u16) -> CycleType {
        match cycle {
            0 => CycleType::Zero,
            1 => CycleType::One,
            2..=256 => CycleType::Visible,
            321 => CycleType::FlushTileData,
            322..=336 => CycleType::Prefetch,
            259 => CycleType::Sprites,
            258 => CycleType::IncrementY,
            257 => CycleType::CopyX,
            280..=304 => CycleType::CopyY,
            340 => CycleType::MapperTick,
            _ => CycleType::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanlineType {
    Visible,
    VBlank,
    PreRender,
    Idle,
}

impl ScanlineType {
    pub fn from_scanline(scanline: u16) -> ScanlineType {
        match scanline {
            0..=239 => ScanlineType::Visible,
            241 => ScanlineType::VBlank,
            261 => ScanlineType::PreRender,
            _ => ScanlineType::Idle,
        }
    }
}
