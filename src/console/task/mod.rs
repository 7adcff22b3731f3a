pub mod poll_job;
