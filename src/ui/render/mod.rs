mod all;
mod footer;
mod list_form;
mod lists;
mod log;
mod status;
mod task_form;
mod tasks;

use self::log::log;
use super::*;
use footer::footer;
use list_form::list_form;
use lists::lists;
use status::status;
use task_form::task_form;
use tasks::tasks;

pub use all::all as render;
pub use lists::list_at;
