mod test_utils;

mod api_info;
mod verify_errors;
