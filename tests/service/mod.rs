//! Integration tests for the service layer.
//!
//! Services are driven against an in-memory database; the calendar is the recording
//! [`TestCalendar`](crate::util::TestCalendar).

mod matches;
mod ranking;
mod standings;

use tourney_test_utils::prelude::*;

use crate::util::TestCalendar;
