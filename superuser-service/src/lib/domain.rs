pub mod superuser;
