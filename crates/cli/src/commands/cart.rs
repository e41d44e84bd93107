//! Cart inspection and editing commands.
//!
//! # Usage
//!
//! ```bash
//! # Add two medium tees
//! np-cart add --id tee:m --product-id tee --name "Pineapple Tee" \
//!     --price-cents 2500 --quantity 2 --variant-id m --option Size=M
//!
//! # Change the quantity (0 or less removes the line)
//! np-cart update tee:m 3
//!
//! # Show the cart and its totals
//! np-cart show
//!
//! # Print the checkout lines as JSON
//! np-cart export
//! ```
//!
//! Each command writes to the supplied writer so it can be tested without a
//! terminal.

use std::io::Write;

use tracing::info;

use naked_pineapple_cart::{CartPersistence, CartStore};
use naked_pineapple_core::{CartLineItem, CurrencyCode, Price};

use super::CliError;

/// Print every line item followed by the totals.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn show<P: CartPersistence>(
    store: &CartStore<P>,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if store.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    writeln!(
        out,
        "Cart ({} lines, {} items)",
        store.line_count(),
        store.item_count()
    )?;
    for item in store.items() {
        writeln!(
            out,
            "  {}  {}{} x{}  {}",
            item.id,
            item.product_name,
            describe_options(item),
            item.quantity,
            Price::from_cents(item.line_total_cents(), currency).display()
        )?;
    }
    writeln!(
        out,
        "Subtotal: {}",
        store.subtotal_price(currency).display()
    )?;
    Ok(())
}

/// Add a line item, merging with an existing line of the same ID.
///
/// # Errors
///
/// Returns `CliError::Output` if writing the summary fails.
pub fn add<P: CartPersistence>(
    store: &mut CartStore<P>,
    item: CartLineItem,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = item.id.clone();
    store.add_item(item);

    let quantity = store.get(id.as_str()).map_or(0, |line| line.quantity);
    info!(line_item_id = %id, quantity, "Added to cart");
    writeln!(out, "{id}: quantity {quantity}")?;
    Ok(())
}

/// Remove a line item.
///
/// # Errors
///
/// Returns `CliError::Output` if writing the summary fails.
pub fn remove<P: CartPersistence>(
    store: &mut CartStore<P>,
    id: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let existed = store.contains(id);
    store.remove_item(id);

    if existed {
        writeln!(out, "{id}: removed")?;
    } else {
        writeln!(out, "{id}: not in cart")?;
    }
    Ok(())
}

/// Set a line item's quantity.
///
/// # Errors
///
/// Returns `CliError::Output` if writing the summary fails.
pub fn update<P: CartPersistence>(
    store: &mut CartStore<P>,
    id: &str,
    quantity: i64,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let existed = store.contains(id);
    store.update_quantity(id, quantity);

    match store.get(id) {
        Some(line) => writeln!(out, "{id}: quantity {}", line.quantity)?,
        None if existed => writeln!(out, "{id}: removed")?,
        None => writeln!(out, "{id}: not in cart")?,
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `CliError::Output` if writing the summary fails.
pub fn clear<P: CartPersistence>(
    store: &mut CartStore<P>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let lines = store.line_count();
    store.clear_cart();

    info!(lines, "Cleared cart");
    writeln!(out, "Cleared {lines} lines")?;
    Ok(())
}

/// Write the checkout lines as pretty-printed JSON.
///
/// # Errors
///
/// Returns `CliError` if serialization or writing fails.
pub fn export<P: CartPersistence>(
    store: &CartStore<P>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, &store.checkout_lines())?;
    writeln!(out)?;
    Ok(())
}

fn describe_options(item: &CartLineItem) -> String {
    match &item.variant_options {
        Some(options) if !options.is_empty() => {
            let joined = options
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect::<Vec<_>>()
                .join(", ");
            format!(" ({joined})")
        }
        _ => String::new(),
    }
}
