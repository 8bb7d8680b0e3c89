use async_trait::async_trait;

/// Finalized order data handed to the dispatcher after the order has been
/// persisted. The dispatcher never sees live entities, only this snapshot.
#[derive(Debug, Clone)]
pub struct OrderSnapshot {
    pub order_date: String,
    pub supplier_name: String,
    pub supplier_email: String,
    pub warehouse_address: String,
    pub items: Vec<OrderSnapshotItem>,
}

#[derive(Debug, Clone)]
pub struct OrderSnapshotItem {
    pub product_sku: String,
    pub product_name: String,
    pub quantity: i32,
    pub rate: i64,
}

/// Purchase order delivery seam. Implementations render the order document
/// and deliver it to the supplier; callers treat failures as fire-and-forget
/// (logged, never retried, never failing the order that was already created).
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn render_and_send(&self, snapshot: &OrderSnapshot) -> anyhow::Result<()>;
}

/// Default dispatcher: renders the document and logs the delivery instead of
/// emailing it. Real PDF/SMTP backends implement the same trait.
pub struct LogDispatcher;

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn render_and_send(&self, snapshot: &OrderSnapshot) -> anyhow::Result<()> {
        let document = render_order_document(snapshot);
        tracing::info!(
            recipient = %snapshot.supplier_email,
            bytes = document.len(),
            "purchase order dispatched"
        );
        Ok(())
    }
}

/// Plain-text purchase order body, shared by the dispatcher and the
/// order-document download endpoint.
pub fn render_order_document(snapshot: &OrderSnapshot) -> String {
    let mut doc = String::new();
    doc.push_str("PURCHASE ORDER\n");
    doc.push_str(&format!("Date: {}\n", snapshot.order_date));
    doc.push_str(&format!("Supplier: {}\n", snapshot.supplier_name));
    doc.push_str(&format!("Deliver to: {}\n\n", snapshot.warehouse_address));
    doc.push_str("SKU\tProduct\tQty\tRate\tAmount\n");
    let mut total: i64 = 0;
    for item in &snapshot.items {
        let amount = i64::from(item.quantity) * item.rate;
        total += amount;
        doc.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            item.product_sku, item.product_name, item.quantity, item.rate, amount
        ));
    }
    doc.push_str(&format!("\nTotal: {total}\n"));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> OrderSnapshot {
        OrderSnapshot {
            order_date: "05 Mar 2026".into(),
            supplier_name: "Acme Trading".into(),
            supplier_email: "orders@acme.example".into(),
            warehouse_address: "12 Dock Road".into(),
            items: vec![
                OrderSnapshotItem {
                    product_sku: "A".into(),
                    product_name: "Widget".into(),
                    quantity: 2,
                    rate: 10,
                },
                OrderSnapshotItem {
                    product_sku: "B".into(),
                    product_name: "Gadget".into(),
                    quantity: 1,
                    rate: 5,
                },
            ],
        }
    }

    #[test]
    fn document_totals_line_items() {
        let doc = render_order_document(&snapshot());
        assert!(doc.contains("Supplier: Acme Trading"));
        assert!(doc.contains("A\tWidget\t2\t10\t20"));
        assert!(doc.contains("Total: 25"));
    }

    #[tokio::test]
    async fn log_dispatcher_always_succeeds() {
        LogDispatcher
            .render_and_send(&snapshot())
            .await
            .expect("log dispatch");
    }
}
