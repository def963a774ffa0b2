//! Print stored products as JSON lines.

use product_catalog::{Category, PgProductStore, Product, ProductFilter, ProductQuery, parse_price};

use super::{CommandError, connect};

/// Turn the mutually exclusive `list` flags into a filter.
///
/// Returns `None` when no flag is given.
pub fn parse_filter(
    name: Option<String>,
    available: Option<bool>,
    category: Option<String>,
    price: Option<String>,
) -> Result<Option<ProductFilter>, CommandError> {
    if let Some(name) = name {
        return Ok(Some(ProductFilter::Name(name)));
    }
    if let Some(available) = available {
        return Ok(Some(ProductFilter::Available(available)));
    }
    if let Some(category) = category {
        let category: Category = category
            .parse()
            .map_err(|e: product_catalog::CategoryError| {
                CommandError::InvalidArgument("category", e.to_string())
            })?;
        return Ok(Some(ProductFilter::Category(category)));
    }
    if let Some(price) = price {
        return Ok(Some(ProductFilter::Price(parse_price(&price)?)));
    }
    Ok(None)
}

fn query_for(filter: ProductFilter) -> ProductQuery {
    match filter {
        ProductFilter::Name(name) => Product::find_by_name(name),
        ProductFilter::Available(available) => Product::find_by_availability(available),
        ProductFilter::Category(category) => Product::find_by_category(category),
        ProductFilter::Price(price) => Product::find_by_price(price),
    }
}

/// Print every product matching `filter`, or every product.
pub async fn run(filter: Option<ProductFilter>) -> Result<(), CommandError> {
    let pool = connect().await?;
    let store = PgProductStore::new(&pool);

    let result = match filter {
        Some(filter) => query_for(filter).all(&store).await,
        None => Product::all(&store).await,
    };
    pool.close().await;
    let products = result?;

    #[allow(clippy::print_stdout)]
    {
        for product in &products {
            println!("{}", product.serialize());
        }
    }
    tracing::info!(count = products.len(), "Listed products");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_no_flags_means_no_filter() {
        assert!(parse_filter(None, None, None, None).unwrap().is_none());
    }

    #[test]
    fn test_parses_each_flag() {
        assert_eq!(
            parse_filter(None, None, Some("FOOD".to_string()), None).unwrap(),
            Some(ProductFilter::Category(Category::Food))
        );
        assert_eq!(
            parse_filter(None, Some(false), None, None).unwrap(),
            Some(ProductFilter::Available(false))
        );
        assert_eq!(
            parse_filter(None, None, None, Some("12.50".to_string())).unwrap(),
            Some(ProductFilter::Price(Decimal::new(1250, 2)))
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = parse_filter(None, None, Some("food".to_string()), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument --category: unknown category: food"
        );

        let err = parse_filter(None, None, None, Some("cheap".to_string())).unwrap_err();
        assert_eq!(err.to_string(), "Invalid type for decimal [price]: cheap");
    }
}
