/// Upper ranking bound of each power tier, best tier first.
const POWER_TIERS: [u16; 19] = [
    5, 10, 15, 20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 115, 130, 150, 170, 190, 210,
];

/// Maps world ranking onto the 1..=20 power scale used by the outcome model.
pub struct PowerScale;

impl PowerScale {
    pub const MAX: u8 = 20;
    pub const MIN: u8 = 1;

    pub fn power(ranking: u16) -> u8 {
        POWER_TIERS
            .iter()
            .position(|&limit| ranking <= limit)
            .map(|tier| Self::MAX - tier as u8)
            .unwrap_or(Self::MIN)
    }

    pub fn differential(home_ranking: u16, away_ranking: u16) -> f64 {
        f64::from(Self::power(home_ranking)) - f64::from(Self::power(away_ranking))
    }
}
