pub mod locate_city;
