//! Shopify rules: revenue growth and inventory

use crate::domain::Domain;
use crate::engine::{Rule, RuleContext};
use crate::recommendation::{Priority, Recommendation};
use crate::snapshot::{Product, Sales};
use crate::Result;

use super::FnRule;

/// Growth above this percentage is worth capitalizing on
const STRONG_GROWTH_PERCENT: f64 = 15.0;

/// Products below this quantity count as low stock
const LOW_INVENTORY_THRESHOLD: f64 = 10.0;

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        FnRule::boxed("shopify.revenue", Domain::Shopify, revenue),
        FnRule::boxed("shopify.inventory", Domain::Shopify, inventory),
    ]
}

/// Current `sales.revenue_growth`, if reported
pub(crate) fn revenue_growth(ctx: &RuleContext<'_>) -> Result<Option<f64>> {
    Ok(ctx
        .snapshot
        .field::<Sales>(Domain::Shopify, &["sales"])?
        .and_then(|s| s.revenue_growth))
}

fn revenue(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    let Some(growth) = revenue_growth(ctx)? else {
        return Ok(vec![]);
    };

    if growth < 0.0 {
        let rec = Recommendation::new(
            "Sales Decline Alert",
            format!(
                "Revenue is down {:.1}%. Review pricing, promotions and supporting content to recover momentum.",
                growth.abs()
            ),
            Priority::High,
            Domain::Shopify,
        )
        .with_modules(&[Domain::Shopify, Domain::Executive, Domain::Content]);
        return Ok(vec![rec]);
    }

    if growth > STRONG_GROWTH_PERCENT {
        let rec = Recommendation::new(
            "Capitalize on Growth",
            format!(
                "Revenue is up {:.1}%. Scale the channels and offers driving it.",
                growth
            ),
            Priority::Medium,
            Domain::Shopify,
        )
        .with_modules(&[Domain::Shopify, Domain::Executive]);
        return Ok(vec![rec]);
    }

    Ok(vec![])
}

fn inventory(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    let products: Vec<Product> = ctx.snapshot.list(Domain::Shopify, "products")?;

    let low_stock = products
        .iter()
        .filter(|p| {
            p.inventory_quantity
                .is_some_and(|q| q < LOW_INVENTORY_THRESHOLD)
        })
        .count();

    if low_stock == 0 {
        return Ok(vec![]);
    }

    let rec = Recommendation::new(
        "Inventory Alert",
        format!(
            "{} product(s) have fewer than {} units in stock. Restock before promoting them.",
            low_stock, LOW_INVENTORY_THRESHOLD
        ),
        Priority::Medium,
        Domain::Shopify,
    )
    .with_modules(&[Domain::Shopify, Domain::Executive]);

    Ok(vec![rec])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RuleContext;
    use crate::rules::test_support::{now, run};
    use crate::snapshot::Snapshot;
    use serde_json::json;

    fn with_growth(growth: f64) -> Snapshot {
        Snapshot::new().with(
            Domain::Shopify,
            json!({"sales": {"revenue_growth": growth}}),
        )
    }

    #[test]
    fn test_decline_cites_absolute_growth() {
        let recs = run(revenue, &with_growth(-12.345));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Sales Decline Alert");
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].description.contains("12.3%"));
        assert_eq!(
            recs[0].modules,
            vec![Domain::Shopify, Domain::Executive, Domain::Content]
        );
    }

    #[test]
    fn test_strong_growth() {
        let recs = run(revenue, &with_growth(22.06));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Capitalize on Growth");
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[0].description.contains("22.1%"));
    }

    #[test]
    fn test_moderate_growth_is_quiet() {
        assert!(run(revenue, &with_growth(0.0)).is_empty());
        assert!(run(revenue, &with_growth(15.0)).is_empty());
    }

    #[test]
    fn test_malformed_growth_fails_rule() {
        let snapshot = Snapshot::new().with(
            Domain::Shopify,
            json!({"sales": {"revenue_growth": "12%"}}),
        );
        assert!(revenue(&RuleContext::new(&snapshot, now())).is_err());
    }

    #[test]
    fn test_inventory_counts_low_stock() {
        let snapshot = Snapshot::new().with(
            Domain::Shopify,
            json!({"products": [
                {"inventory_quantity": 3},
                {"inventory_quantity": 10},
                {"inventory_quantity": 9.5},
                {"title": "no quantity"}
            ]}),
        );

        let recs = run(inventory, &snapshot);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Inventory Alert");
        assert!(recs[0].description.starts_with("2 product(s)"));
    }
}
