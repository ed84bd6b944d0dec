mod filterable;
mod testkit;
