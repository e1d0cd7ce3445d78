use packhouse_core::models::{Order, OrderSummary};
use std::fmt::Write as _;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Orders table followed by the per-status totals.
pub fn render_orders_table(orders: &[Order]) -> String {
    let mut out = String::new();

    if orders.is_empty() {
        out.push_str("No orders found.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<36} {:<28} {:>12} {:>12} {:<10}",
        "ID", "Customer", "Total", "Pending", "Status"
    );
    let _ = writeln!(out, "{}", "-".repeat(102));

    for order in orders {
        let _ = writeln!(
            out,
            "{:<36} {:<28} {:>12.2} {:>12.2} {:<10}",
            order.id,
            truncate_string(&order.customer_name, 28),
            order.total_amount,
            order.pending_payments,
            order.status.as_str()
        );
    }

    let summary = OrderSummary::from_orders(orders);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Orders: {}  Total: {:.2}  Pending payments: {:.2}",
        summary.order_count, summary.total_amount, summary.pending_payments
    );
    for (status, count) in &summary.by_status {
        let _ = writeln!(out, "  {:<10} {}", status.as_str(), count);
    }

    out
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays clean for output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
