use fp_core::StationStatus;

/// Column used to order station lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderColumn {
    CreatedAt,
    UpdatedAt,
}

impl OrderColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderColumn::CreatedAt => "created_at",
            OrderColumn::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: OrderColumn,
    pub ascending: bool,
}

impl Order {
    /// Most recent first.
    pub fn recent(column: OrderColumn) -> Self {
        Self {
            column,
            ascending: false,
        }
    }
}

/// Filter and order for `StationStore::list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub status: Option<StationStatus>,
    pub order: Order,
    pub limit: Option<usize>,
}

impl Default for ListQuery {
    /// Every station, most recently updated first.
    fn default() -> Self {
        Self {
            status: None,
            order: Order::recent(OrderColumn::UpdatedAt),
            limit: None,
        }
    }
}

impl ListQuery {
    pub fn with_status(mut self, status: StationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// PostgREST query parameters for this query.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let direction = if self.order.ascending { "asc" } else { "desc" };
        let mut params = vec![
            ("select".to_string(), "*".to_string()),
            (
                "order".to_string(),
                format!("{}.{}", self.order.column.as_str(), direction),
            ),
        ];
        if let Some(status) = self.status {
            params.push(("status".to_string(), format!("eq.{}", status)));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}
