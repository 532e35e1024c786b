mod assistant_service_test;
mod language_detector_test;
mod upload_service_test;
