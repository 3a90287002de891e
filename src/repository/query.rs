//! Incremental WHERE clause assembly for PostgreSQL statements.

/// Collects `(predicate, args)` pairs and renders them as a single
/// `WHERE ... AND ...` clause.
///
/// Predicates are written with `?` placeholders, one per argument. `build`
/// numbers them `$1..$n` in the order they appear, so the returned arguments
/// line up with the placeholders one to one.
#[derive(Debug, Clone)]
pub struct QueryBuilder<T> {
    predicates: Vec<String>,
    args: Vec<T>,
}

impl<T> Default for QueryBuilder<T> {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
            args: Vec::new(),
        }
    }
}

impl<T> QueryBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and_where<I>(&mut self, predicate: impl Into<String>, args: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        self.predicates.push(predicate.into());
        self.args.extend(args);
        self
    }

    /// Renders the clause. With no predicates the clause is empty, and the
    /// caller must not emit `WHERE` at all.
    pub fn build(self) -> (String, Vec<T>) {
        if self.predicates.is_empty() {
            return (String::new(), Vec::new());
        }

        let joined = self.predicates.join(" AND ");
        let mut clause = String::with_capacity(joined.len() + 6 + self.args.len() * 2);
        clause.push_str("WHERE ");

        let mut position = 0;
        for ch in joined.chars() {
            if ch == '?' {
                position += 1;
                clause.push('$');
                clause.push_str(&position.to_string());
            } else {
                clause.push(ch);
            }
        }
        debug_assert_eq!(position, self.args.len(), "placeholder/argument count mismatch");

        (clause, self.args)
    }
}

/// Wraps a value for a `LIKE`/`ILIKE` "contains" match.
pub fn contains(value: &str) -> String {
    format!("%{}%", value)
}
