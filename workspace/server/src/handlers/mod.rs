mod verify;

pub(crate) use verify::VerifyHandler;
