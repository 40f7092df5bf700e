//! Trellis: the platform-independent core of a native widget toolkit.
//!
//! Application code builds a tree of abstract widgets, each carrying a
//! [`layout::Style`]. A [`WidgetTree`] resolves the tree into absolute pixel
//! bounds with a flexbox-like box model and hands those bounds to a
//! [`backend::NativeBackend`], which owns the real platform widgets. Menus and
//! toolbars are driven by a [`commands::CommandSet`], whose contents are
//! ordered deterministically into groups and sections.
//!
//! # Module Organization
//!
//! - [`layout`] - Style record, intrinsic sizes and the box layout resolver
//! - [`commands`] - Commands, groups and the menu ordering engine
//! - [`backend`] - The native backend contract, a dummy backend and the
//!   backend factory
//! - [`config`] and [`logging`] - Application configuration and tracing setup

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

pub mod app;
pub mod backend;
pub mod commands;
pub mod config;
pub mod layout;
pub mod logging;
pub mod widget;

pub use core::{
    NodeId, StyleQueue, WidgetRegistry, WidgetTree,
    dump::dump,
    error::{self, Error, Result},
    node::{Node, NodeLayout},
};

pub use app::App;
pub use geom;
pub use widget::{Widget, WidgetKind, WidgetMut};
