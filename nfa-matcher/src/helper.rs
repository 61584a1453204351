// `Send` + `Sync` so errors can cross threads; `'static` so they hold no borrowed data
pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
