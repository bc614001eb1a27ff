use crate::schema::{ColumnType, TableSchema};

/// Generate CREATE TABLE SQL for a table schema. `IF NOT EXISTS` so that a
/// merge-mode run against an already populated database is a no-op here.
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let sql_type = match col.col_type {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Boolean => "INTEGER",
            ColumnType::Decimal => "TEXT",
            ColumnType::Vector => "TEXT",
        };

        let null_constraint = if !col.nullable { " NOT NULL" } else { "" };
        let pk = if col.name == "id" { " PRIMARY KEY" } else { "" };

        columns.push(format!(
            "    {} {}{}{}",
            col.name, sql_type, pk, null_constraint
        ));
    }

    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
                schema.name, fk.column, schema.name, fk.column
            )
        })
        .collect()
}

/// INSERT with one placeholder per column, in schema column order.
pub fn generate_insert(schema: &TableSchema) -> String {
    let names: Vec<&str> = schema.columns.iter().map(|c| c.name).collect();
    let placeholders: Vec<&str> = names.iter().map(|_| "?").collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.name,
        names.join(", "),
        placeholders.join(", ")
    )
}

/// UPDATE of every non-id column, keyed on id. Placeholder order is the
/// non-id columns in schema order, then the id.
pub fn generate_update(schema: &TableSchema) -> String {
    let assignments: Vec<String> = schema
        .columns
        .iter()
        .filter(|c| c.name != "id")
        .map(|c| format!("{} = ?", c.name))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = ?",
        schema.name,
        assignments.join(", ")
    )
}

/// Existence probe for the upsert's query-then-branch step.
pub fn generate_exists(schema: &TableSchema) -> String {
    format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", schema.name)
}
