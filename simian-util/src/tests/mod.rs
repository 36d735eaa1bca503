mod op;
