mod init;
mod inspect;
mod run;
