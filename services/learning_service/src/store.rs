use service_core::ddb::get_item::GetItem;
use service_core::ddb::put_item::PutItem;
use service_core::ddb::query::Query;
use service_core::ddb::scan::Scan;
use service_core::ddb::update_item::UpdateItem;

/// The full set of datastore operations a repository may need, bundled so
/// repositories take one generic parameter and tests can substitute a mock.
pub(crate) trait ThreadSafeDdbClient: GetItem + PutItem + Query + Scan + UpdateItem + Send + Sync {}

impl<T: GetItem + PutItem + Query + Scan + UpdateItem + Send + Sync> ThreadSafeDdbClient for T {}
