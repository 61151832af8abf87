use crate::domain::model::{Order, TIMESTAMP_FORMAT};

const ORDER_NUMBER_WIDTH: usize = 15;
const WEIGHT_WIDTH: usize = 15;
const DISTRICT_WIDTH: usize = 20;
const DATE_TIME_WIDTH: usize = 20;

pub const NO_ORDERS_MESSAGE: &str = "No orders match the given criteria.";

/// Fixed-width console table of orders, one line per row.
pub fn render_orders_table(orders: &[Order]) -> String {
    if orders.is_empty() {
        return format!("{}\n", NO_ORDERS_MESSAGE);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<w1$}{:<w2$}{:<w3$}{:<w4$}\n",
        "OrderNumber",
        "Weight(kg)",
        "District",
        "DeliveryDateTime",
        w1 = ORDER_NUMBER_WIDTH,
        w2 = WEIGHT_WIDTH,
        w3 = DISTRICT_WIDTH,
        w4 = DATE_TIME_WIDTH,
    ));
    out.push_str(&"-".repeat(ORDER_NUMBER_WIDTH + WEIGHT_WIDTH + DISTRICT_WIDTH + DATE_TIME_WIDTH));
    out.push('\n');

    for order in orders {
        out.push_str(&format!(
            "{:<w1$}{:<w2$}{:<w3$}{:<w4$}\n",
            order.order_number,
            format!("{:.2}", order.weight),
            order.district,
            order.delivery_date_time.format(TIMESTAMP_FORMAT).to_string(),
            w1 = ORDER_NUMBER_WIDTH,
            w2 = WEIGHT_WIDTH,
            w3 = DISTRICT_WIDTH,
            w4 = DATE_TIME_WIDTH,
        ));
    }
    out
}
