mod chat_session_test;
mod language_test;
mod parsed_content_test;
mod uploaded_file_test;
