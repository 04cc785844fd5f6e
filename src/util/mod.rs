mod backoff;

pub(crate) use backoff::Backoff;
