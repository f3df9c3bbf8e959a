pub mod a001_issue_request;
