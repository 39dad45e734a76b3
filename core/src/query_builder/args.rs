use crate::error::{Error, Result};
use crate::query_builder::{Params, Prepared};
use sqlx::error::BoxDynError;
use sqlx::{Arguments, Database, Encode, Type};
use std::fmt;

trait Encodable<DB: Database>: Send {
    fn add_to<'q>(self: Box<Self>, arguments: &mut <DB as Database>::Arguments<'q>) -> Result<(), BoxDynError>;
}

struct Value<T>(T);

impl<DB, T> Encodable<DB> for Value<T>
where
    DB: Database,
    T: 'static + Send + Type<DB> + for<'q> Encode<'q, DB>,
{
    fn add_to<'q>(self: Box<Self>, arguments: &mut <DB as Database>::Arguments<'q>) -> Result<(), BoxDynError> {
        arguments.add(self.0)
    }
}

/// An owned value that can be bound to a query for `DB`.
///
/// The concrete type is erased so differently typed values can share one [`Params`] map.
pub struct Argument<DB: Database> {
    value: Box<dyn Encodable<DB>>,
    type_name: &'static str,
}

impl<DB: Database> Argument<DB> {
    pub fn new<T>(value: T) -> Self
    where
        T: 'static + Send + Type<DB> + for<'q> Encode<'q, DB>,
    {
        Self {
            value: Box::new(Value(value)),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn add_to<'q>(self, arguments: &mut <DB as Database>::Arguments<'q>) -> Result<()> {
        self.value.add_to(arguments).map_err(Error::EncodeError)
    }
}

impl<DB: Database> fmt::Debug for Argument<DB> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Argument").field(&self.type_name).finish()
    }
}

/// Named parameters holding values for `DB`.
pub type SqlParams<DB> = Params<Argument<DB>>;

impl<DB: Database> Params<Argument<DB>> {
    /// Bind `value` under `name`.
    ///
    /// Values must be owned: bind a `String`, not a `&str`. Some drivers (SQLite) only encode
    /// `&'q str` for one specific lifetime, so even string literals need `.to_string()`.
    pub fn bind<T>(self, name: impl Into<String>, value: T) -> Self
    where
        T: 'static + Send + Type<DB> + for<'q> Encode<'q, DB>,
    {
        self.with(name, Argument::new(value))
    }
}

impl<DB: Database> Prepared<Argument<DB>> {
    /// Encode the arguments into the driver's argument buffer, in position order.
    pub fn into_arguments<'q>(self) -> Result<(String, <DB as Database>::Arguments<'q>)> {
        let mut arguments: <DB as Database>::Arguments<'q> = Default::default();
        arguments.reserve(self.args.len(), 0);
        for arg in self.args {
            arg.add_to(&mut arguments)?;
        }
        Ok((self.sql, arguments))
    }
}
