//! Business logic for the todo list. Each submodule defines "driven ports" (traits the domain
//! needs implemented by storage adapters) and "driving ports" (traits HTTP handlers call into),
//! plus a service implementing the driving port.

pub mod todo;

#[cfg(test)]
pub mod test_util;
