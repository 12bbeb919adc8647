mod put;

pub(crate) use put::put;
