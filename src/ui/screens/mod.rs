pub(crate) mod budgets;
pub(crate) mod daily;
pub(crate) mod dashboard;
pub(crate) mod expenses;
pub(crate) mod monthly;
