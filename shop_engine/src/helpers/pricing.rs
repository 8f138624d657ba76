use shop_common::Price;

/// Sums `unit_price × quantity` over all lines. Returns `None` if any step overflows; the total never wraps.
pub fn order_total<I>(lines: I) -> Option<Price>
where I: IntoIterator<Item = (Price, u32)> {
    lines.into_iter().try_fold(Price::from(0), |total, (price, quantity)| {
        let extension = price.checked_mul(u64::from(quantity))?;
        total.checked_add(extension)
    })
}
