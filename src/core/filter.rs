use crate::domain::model::{Order, PeriodQuery, RangeQuery};
use chrono::NaiveDateTime;

pub fn filter_by_range(orders: &[Order], query: &RangeQuery) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| query.matches(order))
        .cloned()
        .collect()
}

/// Groups by exact district value, first appearance first. Each group keeps
/// its members in source order.
pub fn group_by_district<'a, I>(orders: I) -> Vec<(&'a str, Vec<&'a Order>)>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut groups: Vec<(&'a str, Vec<&'a Order>)> = Vec::new();
    for order in orders {
        match groups
            .iter_mut()
            .find(|(district, _)| *district == order.district.as_str())
        {
            Some((_, members)) => members.push(order),
            None => groups.push((order.district.as_str(), vec![order])),
        }
    }
    groups
}

/// For every district group among the matching orders: take the earliest
/// delivery as the anchor and keep orders within `[anchor, anchor + duration]`.
pub fn filter_by_period(orders: &[Order], query: &PeriodQuery) -> Vec<Order> {
    let window = query.whole_minutes();
    let matching = orders.iter().filter(|order| order.in_district(&query.district));

    let mut selected = Vec::new();
    for (_, members) in group_by_district(matching) {
        let Some(anchor) = members.iter().min_by_key(|order| order.delivery_date_time) else {
            continue;
        };
        let start = anchor.delivery_date_time;
        // Past the last representable instant every later order is in range.
        let end = start
            .checked_add_signed(window)
            .unwrap_or(NaiveDateTime::MAX);

        selected.extend(
            members
                .into_iter()
                .filter(|order| order.delivery_date_time >= start && order.delivery_date_time <= end)
                .cloned(),
        );
    }
    selected
}
