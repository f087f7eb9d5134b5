//! Basic usage example for sqlwhere
//!
//! Run with: cargo run --example basic -p sqlwhere

use sqlwhere::prelude::*;
use sqlwhere::Placeholder;

fn main() -> Result<(), WhereError> {
    // Expressions carry their values
    let filter = where_("status = ?", "active")?
        .and(group("age > ? OR vip = ?", (18, true))?, ())?
        .and(field("country").in_list(["FR", "BE"]), ())?;
    println!("{filter}");
    println!("  -> {}", filter.preview()?);

    // Named placeholders, chosen or generated
    let since = field("created_at").gte_with("2024-01-01", Placeholder::named("since"))?;
    let code = field("code").equals_with("A-7", Placeholder::Random)?;
    let named = since.and(code, ())?;
    println!("{named}");
    println!("  -> {}", serde_json::to_string(&named.values()).unwrap_or_default());

    // Statements
    let query = select(["id", "name"])
        .from("users")
        .where_(filter, ())
        .order_by(["name"])
        .limit(20);
    println!("{}", query.to_sql());
    println!("  -> {}", query.preview()?);

    let rows = (1..=3).map(|i| vec![("id", Value::from(i)), ("name", Value::from(format!("user {i}")))]);
    for batch in insert(rows).into("users").split(2) {
        println!("{}", batch.preview()?);
    }

    Ok(())
}
