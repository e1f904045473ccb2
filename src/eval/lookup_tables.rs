use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Маска стрита A2345 (wheel).
pub const WHEEL_MASK: RankMask = mask_from_ranks(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]);

/// Получить битовую маску для одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    let idx = rank.value().saturating_sub(2); // Rank::Two = 2
    1u16 << idx
}

/// Построить маску из списка рангов.
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        let r = ranks[i] as u8;
        let idx = r.saturating_sub(2);
        mask |= 1 << idx;
        i += 1;
    }
    mask
}

/// Найти стрит в битовой маске рангов.
/// Возвращает старшую карту стрита, если он есть.
///
/// Особый случай: wheel (A2345) → возвращаем Rank::Five.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    // Пять подряд идущих бит; проверяем от туза вниз.
    for high in (Rank::Six.value()..=Rank::Ace.value()).rev() {
        let window: RankMask = 0b1_1111 << (high - 6);
        if rank_mask & window == window {
            return Rank::from_value(high);
        }
    }
    if rank_mask & WHEEL_MASK == WHEEL_MASK {
        return Some(Rank::Five);
    }
    None
}
