use crate::domain::model::{Order, TIMESTAMP_FORMAT};

/// `orderNumber,weight,district,yyyy-MM-dd HH:mm:ss` without a line terminator.
pub fn format_order(order: &Order) -> String {
    format!(
        "{},{},{},{}",
        order.order_number,
        order.weight,
        order.district,
        order.delivery_date_time.format(TIMESTAMP_FORMAT)
    )
}

/// Whole file body: every order followed by `\n`, the last one included.
pub fn serialize_orders(orders: &[Order]) -> String {
    let mut output = String::new();
    for order in orders {
        output.push_str(&format_order(order));
        output.push('\n');
    }
    output
}
