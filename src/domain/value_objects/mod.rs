pub mod api_url;
