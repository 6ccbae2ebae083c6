pub mod mock_sms_client;
pub mod twilio_sms_client;
