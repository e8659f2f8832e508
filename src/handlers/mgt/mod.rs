// handlers/mgt/mod.rs - Management handlers (session authorization required)
//
// Security Level: session caller must exist in the user directory
// Route Prefix: /api/mgt/*
// Middleware: authorize_middleware (route layer), session layer (router)

pub mod terminal_staffing;
